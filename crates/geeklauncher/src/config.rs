//! Configuration constants for geeklauncher

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "geeklauncher";
}

/// Persistence-related configuration
pub mod storage {
    /// Key under which the site list is stored
    pub const SITES_KEY: &str = "geek_launcher_sites";

    /// File backing the key/value store inside the config directory
    pub const STORE_FILE: &str = "storage.json";
}

/// Favicon service configuration
pub mod favicon {
    /// Favicon service endpoint; the domain and size are appended as query parameters
    pub const SERVICE_URL: &str = "https://www.google.com/s2/favicons";

    /// Requested icon size in pixels
    pub const SIZE: u32 = 64;

    /// Domain used when a site URL has no usable host
    pub const FALLBACK_DOMAIN: &str = "google.com";
}

/// Built-in site list
pub mod defaults {
    /// Sites used when nothing is stored yet, as `(id, name, url)`
    pub const SITES: [(&str, &str, &str); 5] = [
        ("1", "Gemini", "https://gemini.google.com"),
        ("2", "DeepSeek", "https://chat.deepseek.com"),
        ("3", "ChatGPT", "https://chat.openai.com"),
        ("4", "Cloudflare", "https://dash.cloudflare.com"),
        ("5", "同花顺", "https://www.10jqka.com.cn"),
    ];
}
