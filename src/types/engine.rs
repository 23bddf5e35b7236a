use serde::Deserialize;

/// Body of a successful `POST /execute`. The engine also echoes
/// `disk_resoult` and `part_resoult`; their shape varies and they are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub messages: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecuteResponse {
    /// Messages in engine order; `null` or missing means none.
    pub fn into_messages(self) -> Vec<String> {
        self.messages.unwrap_or_default()
    }

    pub fn engine_error(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

/// A simulated disk as reported by `GET /discos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Disk {
    pub size: i64,
    pub unit: String,
    pub fit: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, rename = "particiones")]
    pub partitions: Option<Vec<Partition>>,
}

impl Disk {
    /// Partitions worth drawing; `None` when absent or empty.
    pub fn listed_partitions(&self) -> Option<&[Partition]> {
        self.partitions
            .as_deref()
            .filter(|partitions| !partitions.is_empty())
    }
}

/// A partition entry. Every field may be missing on the wire and is kept
/// exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Partition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub fit: Option<String>,
}
