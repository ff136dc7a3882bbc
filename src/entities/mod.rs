pub mod period_champions;
pub mod prize_wins;
pub mod prizes;
pub mod sales_records;
pub mod users;

pub use period_champions as period_champion_entity;
pub use prize_wins as prize_win_entity;
pub use prizes as prize_entity;
pub use sales_records as sales_record_entity;
pub use users as user_entity;

pub use prize_wins::PeriodType;
pub use prizes::PrizeCategory;
pub use users::Role;
