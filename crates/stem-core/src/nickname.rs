//! Nickname rules
//!
//! Enrolled members are shown as `名前(学籍番号)`, graduates as `名前(N期卒業生)`.

use std::sync::LazyLock;

use regex::Regex;

use crate::entities::{Member, MemberStatus};
use crate::error::DomainError;

/// Discord's limit on guild nicknames
pub const NICKNAME_MAX_CHARS: usize = 32;

// Shortest non-empty prefix terminated by an ASCII or full-width opening parenthesis
static LEADING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)[(（]").expect("leading name pattern is valid"));

// Parenthesized segment at the very end, either character set
static TRAILING_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(（][^()（）]*[)）]$").expect("trailing segment pattern is valid"));

/// Build the canonical nickname for a member
pub fn format_nickname(
    name: &str,
    status: MemberStatus,
    generation: i32,
    student_number: Option<&str>,
) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::ValidationError("name is required".to_string()));
    }

    let nickname = match status {
        MemberStatus::Junior | MemberStatus::Senior => {
            let student_number = student_number
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or(DomainError::MissingStudentNumber)?;
            format!("{name}({student_number})")
        }
        MemberStatus::Alumnus => format!("{name}({generation}期卒業生)"),
    };

    if nickname.chars().count() > NICKNAME_MAX_CHARS {
        return Err(DomainError::NicknameTooLong {
            max: NICKNAME_MAX_CHARS,
        });
    }

    Ok(nickname)
}

/// Build the canonical nickname from a member record
pub fn format_member_nickname(name: &str, member: &Member) -> Result<String, DomainError> {
    format_nickname(name, member.status, member.generation, member.student_number())
}

/// Recover the bare name from a display string such as `名前(12345)`
///
/// Strings without a parenthesized part are returned trimmed.
pub fn extract_name(display: &str) -> String {
    if let Some(captures) = LEADING_NAME.captures(display) {
        let name = captures[1].trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    TRAILING_SEGMENT.replace(display, "").trim().to_string()
}
