//! Diesel table definitions. Keep in sync with `backend/migrations`.

diesel::table! {
    /// Stored user records.
    users (id) {
        /// Primary key, a UUID v4 rendered as text.
        id -> Text,
        /// Optional display name.
        name -> Nullable<Text>,
        /// Creation instant.
        created_at -> Timestamptz,
        /// Last modification instant.
        updated_at -> Timestamptz,
    }
}
