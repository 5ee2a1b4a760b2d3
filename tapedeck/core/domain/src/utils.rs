pub mod aliases {
    pub type MaybeOwnedString = ::std::borrow::Cow<'static, str>;

    pub type Timestamp = i64;
}

pub mod clock {
    use crate::utils::aliases::Timestamp;

    pub fn now() -> Timestamp {
        ::chrono::Utc::now().timestamp()
    }
}
