use std::time::SystemTime;

use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait SystemTimeExt {
    /// Local wall-clock rendering, e.g. `2024-03-01 17:05:09`.
    fn to_timestamp(&self) -> String;
}

impl SystemTimeExt for SystemTime {
    fn to_timestamp(&self) -> String {
        DateTime::<Local>::from(*self)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }
}
