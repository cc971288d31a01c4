use crate::calendar::Clock;
use time::{error::IndeterminateOffset, Date, OffsetDateTime, UtcOffset};

/// The system clock, read in the local timezone as of startup
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LocalClock {
    offset: UtcOffset,
}

impl LocalClock {
    pub(crate) fn detect() -> Result<LocalClock, IndeterminateOffset> {
        let offset = UtcOffset::current_local_offset()?;
        Ok(LocalClock { offset })
    }
}

impl Clock for LocalClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}
