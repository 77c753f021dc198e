pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn check_password(password: &str) -> Option<&'static str> {
    if password.len() < 8 {
        Some("Password must be at least 8 characters long")
    } else {
        None
    }
}
