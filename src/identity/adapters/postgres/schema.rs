//! Diesel schema for account persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Normalized unique email address.
        #[max_length = 254]
        email -> Varchar,
        /// Family name.
        #[max_length = 255]
        last_name -> Varchar,
        /// Given name.
        #[max_length = 255]
        first_name -> Varchar,
        /// Phone number.
        #[max_length = 50]
        phone -> Varchar,
        /// PHC-formatted Argon2id hash.
        password_hash -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued login sessions keyed by credential digest.
    sessions (digest) {
        /// Hex SHA-256 digest of the credential.
        #[max_length = 64]
        digest -> Varchar,
        /// Session owner.
        #[max_length = 254]
        email -> Varchar,
        /// Issue timestamp.
        issued_at -> Timestamptz,
        /// Expiry timestamp.
        expires_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, sessions);
