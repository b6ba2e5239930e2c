use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct UserRegisteredEvent {
    pub user_id: String,
    pub email: String,
    pub registered_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub booking_id: Uuid,
    pub movie_id: String,
    pub screening: String,
    pub seat_count: u32,
    pub total_price: u32,
    pub confirmed_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PaymentCapturedEvent {
    pub reference: String,
    pub amount: u32,
    pub captured_at: i64,
}
