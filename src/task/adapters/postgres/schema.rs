//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records with reward economics and urgency windows.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning player.
        user_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Trained attribute.
        #[max_length = 50]
        category -> Varchar,
        /// Recurrence kind.
        #[max_length = 50]
        frequency -> Varchar,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Experience reward.
        xp_reward -> Int8,
        /// Gold reward.
        gold_reward -> Int8,
        /// Attribute boost.
        stat_boost -> Int4,
        /// Energy paid when starting.
        energy_cost -> Int4,
        /// Gold paid when creating.
        gold_cost -> Int8,
        /// Urgent deadline.
        urgent_until -> Nullable<Timestamptz>,
        /// Gold deducted when declined.
        urgent_penalty -> Nullable<Int8>,
        /// Difficulty rating.
        difficulty -> Int4,
        /// Whether an assessor classified the task.
        ai_analyzed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last lifecycle timestamp.
        updated_at -> Timestamptz,
        /// Start timestamp.
        started_at -> Nullable<Timestamptz>,
        /// Completion or failure timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}
