use std::collections::HashMap;

use crate::models::CallsResponse;

/// Resolves Gong speaker ids to human-readable names.
///
/// Built from `/calls/extensive` party data and keyed by (call id,
/// speaker id), since speaker ids are only unique within a call. Used by
/// the presentation layer only; the alignment pipeline never needs names.
#[derive(Debug, Clone, Default)]
pub struct SpeakerDirectory {
    names: HashMap<(u64, String), String>,
}

impl SpeakerDirectory {
    pub fn from_calls(calls: &CallsResponse) -> Self {
        let mut names = HashMap::new();

        for call in &calls.calls {
            let Ok(call_id) = call.meta_data.id.parse::<u64>() else {
                continue;
            };
            for party in &call.parties {
                if let (Some(speaker_id), Some(name)) = (&party.speaker_id, &party.name) {
                    names.insert((call_id, speaker_id.clone()), name.clone());
                }
            }
        }

        Self { names }
    }

    /// Resolve one speaker's display name
    pub fn resolve(&self, call_id: u64, speaker_id: &str) -> Option<&str> {
        self.names
            .get(&(call_id, speaker_id.to_string()))
            .map(String::as_str)
    }

    /// Name map for one call, keyed by speaker id
    pub fn for_call(&self, call_id: u64) -> HashMap<String, String> {
        self.names
            .iter()
            .filter(|((call, _), _)| *call == call_id)
            .map(|((_, speaker), name)| (speaker.clone(), name.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
