#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArchiveType {
    #[default]
    Nupkg,
    Zip,
}

impl ArchiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nupkg => "nupkg",
            Self::Zip => "zip",
        }
    }

    /// File extension used for the temporary download in the cache root.
    pub fn cache_extension(self) -> &'static str {
        self.as_str()
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "nupkg" => Some(Self::Nupkg),
            "zip" => Some(Self::Zip),
            _ => None,
        }
    }
}
