mod grid;
mod picker;
mod util;
mod widget;
pub(crate) use self::picker::{DatePicker, PickerEvent};
pub(crate) use self::widget::{PickerLayout, PickerWidget, Target};
use time::Date;

/// Source of the real-world current date
pub(crate) trait Clock {
    fn today(&self) -> Date;
}

/// A date is a clock that is stuck on that date
impl Clock for Date {
    fn today(&self) -> Date {
        *self
    }
}
