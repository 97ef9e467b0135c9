pub mod user;

pub use user::{
    Gender, NewUser, PageRequest, Role, User, UserChanges, UserFilters, UserPage,
};
