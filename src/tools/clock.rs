use chrono::prelude::*;

pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

pub trait Clock {
    fn print(&self) -> String;
}

impl<T> Clock for DateTime<T> where T: chrono::TimeZone, T::Offset: std::fmt::Display {
    fn print(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Micros, false)
    }
}
