/// Document ids are opaque strings (ObjectId hex when minted by the store).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
