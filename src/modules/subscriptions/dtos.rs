use serde::Deserialize;

#[derive(Deserialize)]
pub struct InitiateSubscriptionRequest {
    pub mess_id: i32,
    pub plan_id: i32,
}
