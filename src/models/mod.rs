pub mod dose;
pub mod frequency;
pub mod medication_type;
pub mod time_of_day;
