//! 请求数据校验
//!
//! 每种输入对应一个校验函数，收集全部字段错误后一起返回。

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::user::{MAX_LIMIT, PageRequest};
use crate::models::{Gender, NewUser, Role, UserChanges, UserFilters};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email regex compiles")
});

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;
const SEARCH_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0)
        }
    }
}

const USER_FIELDS: [&str; 4] = ["name", "email", "gender", "role"];

/// 校验创建用户的请求体
pub fn validate_create_user(body: &Value) -> Result<NewUser, Vec<FieldError>> {
    let mut errors = Errors::default();
    let Some(obj) = as_object(body, &mut errors) else {
        return Err(errors.0);
    };
    reject_unknown(obj, &USER_FIELDS, &mut errors);

    let name = match string_field(obj, "name", &mut errors) {
        Some(name) => check_name(name, &mut errors),
        None => {
            if !obj.contains_key("name") {
                errors.push("name", "Name is required");
            }
            None
        }
    };
    let email = match string_field(obj, "email", &mut errors) {
        Some(email) => check_email(email, &mut errors),
        None => {
            if !obj.contains_key("email") {
                errors.push("email", "Email is required");
            }
            None
        }
    };
    let gender = enum_field::<Gender>(obj, "gender", "Gender", &Gender::ALL.map(|g| g.as_str()), &mut errors);
    let role = enum_field::<Role>(obj, "role", "Role", &Role::ALL.map(|r| r.as_str()), &mut errors);

    match (name, email) {
        (Some(name), Some(email)) => errors.finish(NewUser {
            name,
            email,
            gender,
            role,
        }),
        _ => Err(errors.0),
    }
}

/// 校验更新用户的请求体，所有字段可选但至少要有一个
pub fn validate_update_user(body: &Value) -> Result<UserChanges, Vec<FieldError>> {
    let mut errors = Errors::default();
    let Some(obj) = as_object(body, &mut errors) else {
        return Err(errors.0);
    };
    reject_unknown(obj, &USER_FIELDS, &mut errors);

    let changes = UserChanges {
        name: string_field(obj, "name", &mut errors).and_then(|n| check_name(n, &mut errors)),
        email: string_field(obj, "email", &mut errors).and_then(|e| check_email(e, &mut errors)),
        gender: enum_field::<Gender>(obj, "gender", "Gender", &Gender::ALL.map(|g| g.as_str()), &mut errors),
        role: enum_field::<Role>(obj, "role", "Role", &Role::ALL.map(|r| r.as_str()), &mut errors),
    };

    if changes.is_empty() && errors.0.is_empty() {
        errors.push("body", "At least one field must be provided for update");
    }
    errors.finish(changes)
}

const QUERY_FIELDS: [&str; 5] = ["page", "limit", "gender", "role", "search"];

/// 校验列表查询参数，缺省 page=1、limit=10
pub fn validate_list_query(
    params: &HashMap<String, String>,
) -> Result<(UserFilters, PageRequest), Vec<FieldError>> {
    let mut errors = Errors::default();
    let mut unknown: Vec<&String> = params
        .keys()
        .filter(|k| !QUERY_FIELDS.contains(&k.as_str()))
        .collect();
    unknown.sort();
    for key in unknown {
        errors.push(key, format!("\"{key}\" is not allowed"));
    }

    let mut page = PageRequest::default();
    if let Some(raw) = params.get("page") {
        match raw.trim().parse::<i64>() {
            Ok(p) if p >= 1 && p <= u32::MAX as i64 => page.page = p as u32,
            Ok(_) => errors.push("page", "Page must be at least 1"),
            Err(_) => errors.push("page", "Page must be a valid integer"),
        }
    }
    if let Some(raw) = params.get("limit") {
        match raw.trim().parse::<i64>() {
            Ok(l) if l < 1 => errors.push("limit", "Limit must be at least 1"),
            Ok(l) if l > MAX_LIMIT as i64 => errors.push("limit", "Limit must not exceed 100"),
            Ok(l) => page.limit = l as u32,
            Err(_) => errors.push("limit", "Limit must be a valid integer"),
        }
    }

    let mut filters = UserFilters::default();
    if let Some(raw) = params.get("gender") {
        match raw.parse::<Gender>() {
            Ok(g) => filters.gender = Some(g),
            Err(_) => errors.push("gender", "Gender filter must be one of: male, female, other"),
        }
    }
    if let Some(raw) = params.get("role") {
        match raw.parse::<Role>() {
            Ok(r) => filters.role = Some(r),
            Err(_) => errors.push("role", "Role filter must be one of: user, admin, moderator"),
        }
    }
    if let Some(raw) = params.get("search") {
        let len = raw.chars().count();
        if len < 1 {
            errors.push("search", "Search term must be at least 1 character long");
        } else if len > SEARCH_MAX {
            errors.push("search", "Search term must not exceed 100 characters");
        } else {
            filters.search = Some(raw.clone());
        }
    }

    errors.finish((filters, page))
}

/// 解析路径中的用户 ID，只接受正整数
pub fn parse_user_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
}

fn as_object<'a>(body: &'a Value, errors: &mut Errors) -> Option<&'a Map<String, Value>> {
    let obj = body.as_object();
    if obj.is_none() {
        errors.push("body", "Request body must be a JSON object");
    }
    obj
}

fn reject_unknown(obj: &Map<String, Value>, allowed: &[&str], errors: &mut Errors) {
    for key in obj.keys().filter(|k| !allowed.contains(&k.as_str())) {
        errors.push(key, format!("\"{key}\" is not allowed"));
    }
}

fn string_field<'a>(obj: &'a Map<String, Value>, field: &str, errors: &mut Errors) -> Option<&'a str> {
    match obj.get(field)? {
        Value::String(s) => Some(s.as_str()),
        _ => {
            errors.push(field, format!("{} must be a string", label(field)));
            None
        }
    }
}

fn enum_field<T: FromStr>(
    obj: &Map<String, Value>,
    field: &str,
    label: &str,
    allowed: &[&str],
    errors: &mut Errors,
) -> Option<T> {
    let raw = string_field(obj, field, errors)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(field, format!("{label} must be one of: {}", allowed.join(", ")));
            None
        }
    }
}

fn check_name(name: &str, errors: &mut Errors) -> Option<String> {
    let len = name.chars().count();
    if len == 0 {
        errors.push("name", "Name is required");
    } else if len < NAME_MIN {
        errors.push("name", "Name must be at least 2 characters long");
    } else if len > NAME_MAX {
        errors.push("name", "Name must not exceed 100 characters");
    } else {
        return Some(name.to_string());
    }
    None
}

fn check_email(email: &str, errors: &mut Errors) -> Option<String> {
    if email.is_empty() {
        errors.push("email", "Email is required");
        None
    } else if email.chars().count() > EMAIL_MAX {
        errors.push("email", "Email must not exceed 254 characters");
        None
    } else if !EMAIL_REGEX.is_match(email) {
        errors.push("email", "Please provide a valid email address");
        None
    } else {
        Some(email.to_string())
    }
}

fn label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
