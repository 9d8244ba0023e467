/// Number of character slots in the edit buffer (`dd.mm.yyyy` and friends)
pub const BUFFER_LEN: usize = 10;

/// Maximum accepted year (inclusive), larger values are clamped down
pub const MAX_YEAR: u16 = 2100;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day/month/year, used for lower bounds
pub const MIN_DAY: u8 = 1;
pub const MIN_MONTH: u8 = 1;
pub const MIN_YEAR: u16 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is "month not entered yet" and allows the full 31)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    31, // month not set
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

pub const SEPARATOR_DOT: char = '.';
pub const SEPARATOR_SLASH: char = '/';
pub const SEPARATOR_DASH: char = '-';

pub const DAY_PLACEHOLDER_EN: char = 'd';
pub const MONTH_PLACEHOLDER_EN: char = 'm';
pub const YEAR_PLACEHOLDER_EN: char = 'y';

pub const DAY_PLACEHOLDER_RU: char = 'д';
pub const MONTH_PLACEHOLDER_RU: char = 'м';
pub const YEAR_PLACEHOLDER_RU: char = 'г';

pub const DAY_PLACEHOLDER_DE: char = 't';
pub const MONTH_PLACEHOLDER_DE: char = 'm';
pub const YEAR_PLACEHOLDER_DE: char = 'j';
