use serde::Deserialize;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ProviderSignupRequest {
    pub email: String,
    pub code: String,
    pub name: String,
    pub password: String,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
