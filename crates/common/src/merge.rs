use serde_json::{Map, Value};

use crate::MockConfig;

impl MockConfig {
    /// Merges `overlay` into `self`. Overlay entries win on collision;
    /// nested mappings merge recursively, anything else is replaced
    /// wholesale. Replaced keys keep their position, new keys append.
    pub fn merge_from(&mut self, overlay: MockConfig) {
        merge_maps(self.map_mut(), overlay.into_map());
    }
}

fn merge_maps(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_maps(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
