use crate::domain::ParsedRecord;
use crate::policy::AdmissionRule;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    KeepPending,
    KeepAbnormal,
    Discard,
}

impl Decision {
    pub fn is_kept(self) -> bool {
        !matches!(self, Decision::Discard)
    }
}

impl AdmissionRule {
    /// Pure over `(status, remark)`; a missing remark reads as empty.
    pub fn decide(&self, status: Option<&str>, remark: Option<&str>) -> Decision {
        let remark = remark.unwrap_or("");
        match status {
            Some(s) if s == self.pending_status => Decision::KeepPending,
            Some(s) if s == self.abnormal_status => {
                if self.required_remarks.iter().all(|needle| remark.contains(needle.as_str())) {
                    Decision::KeepAbnormal
                } else {
                    Decision::Discard
                }
            }
            _ => Decision::Discard,
        }
    }

    pub fn decide_record(&self, record: &ParsedRecord) -> Decision {
        self.decide(
            record.get(&self.status_column),
            record.get(&self.remark_column),
        )
    }

    pub fn admits(&self, record: &ParsedRecord) -> bool {
        self.decide_record(record).is_kept()
    }
}
