use uuid::Uuid;

use crate::utils::time;

/// Table-unique opaque id: time-based prefix plus a random suffix. Collisions
/// are treated as negligible and not checked.
pub fn synthesize(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, time::unix_millis(), &suffix[..9])
}
