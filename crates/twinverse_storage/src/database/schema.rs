//! Diesel table definitions.

diesel::table! {
    reality_results (id) {
        id -> Uuid,
        user_id -> Text,
        generated_profile -> Jsonb,
        created_at -> Timestamptz,
        chat_log -> Jsonb,
    }
}

diesel::table! {
    user_profiles (user_id) {
        user_id -> Text,
        profile -> Jsonb,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(reality_results, user_profiles);
