/// Category filter value that selects the whole collection.
pub const ALL_CATEGORIES: &str = "all";

/// Local storage key holding the JSON-serialized quote collection.
pub const QUOTES_STORAGE_KEY: &str = "quotes";

/// Local storage key holding the JSON-serialized sync/filter state.
pub const SYNC_STATE_STORAGE_KEY: &str = "quoteSyncState";

/// File name suggested to clients downloading an export.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Collection seeded when nothing has been persisted yet.
pub const DEFAULT_QUOTES: [(&str, &str); 5] = [
    ("Be yourself; everyone else is already taken. - Oscar Wilde", "Inspiration"),
    ("You only live once, but if you do it right, once is enough. - Mae West", "Life"),
    ("The purpose of our lives is to be happy. - Dalai Lama", "Happiness"),
    ("Life is what happens when you're busy making other plans. - John Lennon", "Life"),
    ("Live life to the fullest. - Unknown", "Motivation"),
];
