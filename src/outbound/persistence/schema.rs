//! Diesel table definitions.
//!
//! The `bars.geom` geography column is intentionally absent: it is written
//! and queried only through raw PostGIS SQL, never through the query
//! builder.

diesel::table! {
    users (id) {
        id -> Uuid,
        email -> Varchar,
        password_hash -> Text,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        profile_image_url -> Nullable<Text>,
        points -> Int4,
        level -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    bars (id) {
        id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        description -> Nullable<Text>,
        address -> Varchar,
        city -> Varchar,
        state -> Varchar,
        zip_code -> Nullable<Varchar>,
        latitude -> Float8,
        longitude -> Float8,
        phone -> Nullable<Varchar>,
        website -> Nullable<Text>,
        image_url -> Nullable<Text>,
        hours -> Nullable<Jsonb>,
        amenities -> Jsonb,
        offers_kava -> Bool,
        offers_kratom -> Bool,
        vibe -> Nullable<Varchar>,
        is_verified -> Bool,
        average_rating -> Numeric,
        review_count -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    reviews (id) {
        id -> Uuid,
        bar_id -> Uuid,
        user_id -> Uuid,
        rating -> Int4,
        comment -> Nullable<Text>,
        photo_url -> Nullable<Text>,
        is_verified -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    check_ins (id) {
        id -> Uuid,
        bar_id -> Uuid,
        user_id -> Uuid,
        note -> Nullable<Text>,
        photo_url -> Nullable<Text>,
        points -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    favorites (id) {
        id -> Uuid,
        bar_id -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    bar_photos (id) {
        id -> Uuid,
        bar_id -> Uuid,
        user_id -> Nullable<Uuid>,
        image_url -> Text,
        caption -> Nullable<Text>,
        is_verified -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    achievements (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        icon -> Nullable<Varchar>,
        points_required -> Int4,
        bars_required -> Int4,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    user_achievements (id) {
        id -> Uuid,
        user_id -> Uuid,
        achievement_id -> Uuid,
        earned_at -> Timestamptz,
    }
}

diesel::joinable!(reviews -> bars (bar_id));
diesel::joinable!(reviews -> users (user_id));
diesel::joinable!(check_ins -> bars (bar_id));
diesel::joinable!(check_ins -> users (user_id));
diesel::joinable!(favorites -> bars (bar_id));
diesel::joinable!(favorites -> users (user_id));
diesel::joinable!(bar_photos -> bars (bar_id));
diesel::joinable!(bar_photos -> users (user_id));
diesel::joinable!(user_achievements -> achievements (achievement_id));
diesel::joinable!(user_achievements -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    bars,
    reviews,
    check_ins,
    favorites,
    bar_photos,
    achievements,
    user_achievements,
);
