use serde::Deserialize;

#[derive(Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
    pub purpose: String,
}

#[derive(Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
    pub purpose: String,
}
