use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddHabitRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub habit_id: u64,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub score: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitView {
    pub id: u64,
    pub name: String,
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub habits: Vec<HabitView>,
    pub rate: u8,
    pub mood: Option<u8>,
    pub streak: u32,
    pub forest_level: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub date: String,
    pub completed: Vec<String>,
    pub incomplete: Vec<String>,
    pub rate: u8,
    pub streak: u32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PartnerResponse {
    Ok { name: String, image: Option<String> },
    Unavailable,
}
