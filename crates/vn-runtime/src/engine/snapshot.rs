use super::*;

impl VnEngine {
    pub fn snapshot(&self) -> Result<EngineSnapshot, VnError> {
        if self.back_stack.is_empty() {
            return Err(VnError::new(
                "SNAPSHOT_NOT_STARTED",
                "snapshot() is only allowed after the first step is shown.",
            ));
        }

        Ok(EngineSnapshot {
            schema_version: SNAPSHOT_SCHEMA_V1.to_string(),
            script_len: self.script.len(),
            script_index: self.script_index,
            page_queue: self.page_queue.clone(),
            back_stack: self.back_stack.clone(),
            history: self.history.clone(),
            last_speaker: self.last_speaker.clone(),
        })
    }

    pub fn resume(&mut self, snapshot: EngineSnapshot) -> Result<(), VnError> {
        if snapshot.schema_version != SNAPSHOT_SCHEMA_V1 {
            return Err(VnError::new(
                "SNAPSHOT_SCHEMA",
                format!(
                    "Unsupported snapshot schema \"{}\".",
                    snapshot.schema_version
                ),
            ));
        }

        let script_len = self.script.len();
        if snapshot.script_len != script_len {
            return Err(VnError::new(
                "SNAPSHOT_SCRIPT_MISMATCH",
                format!(
                    "Snapshot was taken on a script of {} lines, engine has {}.",
                    snapshot.script_len, script_len
                ),
            ));
        }

        let Some(top) = snapshot.back_stack.last() else {
            return Err(VnError::new(
                "SNAPSHOT_STATE_INCONSISTENT",
                "Snapshot back stack is empty.",
            ));
        };
        if top.script_index != snapshot.script_index || top.page_queue != snapshot.page_queue {
            return Err(VnError::new(
                "SNAPSHOT_STATE_INCONSISTENT",
                "Snapshot position does not match its top back stack frame.",
            ));
        }

        let frames_in_range = snapshot.back_stack.iter().all(|frame| {
            frame.script_index <= script_len && frame.step.script_index < script_len
        });
        let history_in_range = snapshot
            .history
            .iter()
            .all(|entry| entry.index < script_len);
        if snapshot.script_index > script_len || !frames_in_range || !history_in_range {
            return Err(VnError::new(
                "SNAPSHOT_INDEX_RANGE",
                "Snapshot refers to script lines that do not exist.",
            ));
        }

        self.script_index = snapshot.script_index;
        self.page_queue = snapshot.page_queue;
        self.back_stack = snapshot.back_stack;
        self.history = snapshot.history;
        self.last_speaker = snapshot.last_speaker;
        tracing::debug!(script_index = self.script_index, "resumed snapshot");
        Ok(())
    }
}
