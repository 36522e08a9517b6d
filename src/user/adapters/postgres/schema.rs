//! Diesel schema for player persistence.

diesel::table! {
    /// Player records.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// External account identifier.
        external_id -> Int8,
        /// Account handle.
        username -> Text,
        /// Given name.
        first_name -> Text,
        /// Avatar URL.
        photo_url -> Text,
        /// Current level.
        level -> Int4,
        /// Experience within the current level.
        xp -> Int8,
        /// Experience threshold for the next level.
        xp_to_next_level -> Int8,
        /// Gold balance.
        gold -> Int8,
        /// Current energy.
        energy -> Int4,
        /// Energy ceiling.
        max_energy -> Int4,
        /// Strength counter.
        strength -> Int4,
        /// Agility counter.
        agility -> Int4,
        /// Intelligence counter.
        intelligence -> Int4,
        /// Insight counter.
        insight -> Int4,
        /// License activation flag.
        license_active -> Bool,
        /// License expiry.
        license_expires_at -> Timestamptz,
        /// Last license renewal.
        license_checked_at -> Timestamptz,
        /// Advisory requests left.
        advisory_requests -> Int4,
        /// Advisory quota reset instant.
        advisory_resets_at -> Timestamptz,
        /// Registration timestamp.
        created_at -> Timestamptz,
        /// Last activity timestamp.
        last_active_at -> Timestamptz,
    }
}
