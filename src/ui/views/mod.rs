mod day_view;
mod month_view;

pub use day_view::render_day;
pub use month_view::render_month;
