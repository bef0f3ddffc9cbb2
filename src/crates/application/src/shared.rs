use chrono::{Local, NaiveDate};

/// 本地日历日期，作为快照与名次比较的默认日期
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
