use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Events are held every other Wednesday, in even ISO weeks
pub fn next_event(from: NaiveDate) -> NaiveDate {
    let wednesday = next_wednesday(from);
    if wednesday.iso_week().week() % 2 != 0 {
        return next_wednesday(wednesday + Days::new(1));
    }
    wednesday
}

fn next_wednesday(date: NaiveDate) -> NaiveDate {
    let today = date.weekday().num_days_from_sunday();
    let target = Weekday::Wed.num_days_from_sunday();
    let days_until = (target + 7 - today) % 7;
    date + Days::new(u64::from(days_until))
}
