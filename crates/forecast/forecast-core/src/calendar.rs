//! Future period calendar

use chrono::{Datelike, Days, Months, NaiveDate};
use forecast_spi::Frequency;

/// The `periods` dates strictly after `last` at the given frequency
///
/// Weekly periods are anchored on Sunday and monthly periods on the last day
/// of the month.
pub fn future_dates(last: NaiveDate, periods: usize, frequency: Frequency) -> Vec<NaiveDate> {
    let first = match frequency {
        Frequency::Daily => last.checked_add_days(Days::new(1)),
        Frequency::Weekly => {
            let ahead = 7 - u64::from(last.weekday().num_days_from_sunday());
            last.checked_add_days(Days::new(ahead))
        }
        Frequency::Monthly => month_end(last).and_then(|end| {
            if end > last {
                Some(end)
            } else {
                next_month_end(end)
            }
        }),
    };

    std::iter::successors(first, |&d| match frequency {
        Frequency::Daily => d.checked_add_days(Days::new(1)),
        Frequency::Weekly => d.checked_add_days(Days::new(7)),
        Frequency::Monthly => next_month_end(d),
    })
    .take(periods)
    .collect()
}

fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

fn next_month_end(end: NaiveDate) -> Option<NaiveDate> {
    month_end(end.succ_opt()?)
}
