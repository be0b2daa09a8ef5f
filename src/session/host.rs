/// The outbound half of the host text-input framework.
///
/// The host owns the on-screen composition and candidate widgets; the
/// session only tells it what to show and what to commit.
pub trait HostAdapter {
    fn set_composition_string(&mut self, text: &str);
    fn set_composition_cursor(&mut self, pos: usize);
    fn set_candidate_list(&mut self, candidates: &[String]);
    fn set_candidate_cursor(&mut self, index: usize);
    fn set_show_candidates(&mut self, show: bool);
    fn set_commit_string(&mut self, text: &str);
}

/// One host call produced by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    SetCompositionString(String),
    SetCompositionCursor(usize),
    SetCandidateList(Vec<String>),
    SetCandidateCursor(usize),
    SetShowCandidates(bool),
    SetCommitString(String),
}

impl HostCall {
    pub fn apply(&self, host: &mut dyn HostAdapter) {
        match self {
            HostCall::SetCompositionString(text) => host.set_composition_string(text),
            HostCall::SetCompositionCursor(pos) => host.set_composition_cursor(*pos),
            HostCall::SetCandidateList(list) => host.set_candidate_list(list),
            HostCall::SetCandidateCursor(index) => host.set_candidate_cursor(*index),
            HostCall::SetShowCandidates(show) => host.set_show_candidates(*show),
            HostCall::SetCommitString(text) => host.set_commit_string(text),
        }
    }
}

/// Records every call, in order. Handy as a host double.
impl HostAdapter for Vec<HostCall> {
    fn set_composition_string(&mut self, text: &str) {
        self.push(HostCall::SetCompositionString(text.to_string()));
    }

    fn set_composition_cursor(&mut self, pos: usize) {
        self.push(HostCall::SetCompositionCursor(pos));
    }

    fn set_candidate_list(&mut self, candidates: &[String]) {
        self.push(HostCall::SetCandidateList(candidates.to_vec()));
    }

    fn set_candidate_cursor(&mut self, index: usize) {
        self.push(HostCall::SetCandidateCursor(index));
    }

    fn set_show_candidates(&mut self, show: bool) {
        self.push(HostCall::SetShowCandidates(show));
    }

    fn set_commit_string(&mut self, text: &str) {
        self.push(HostCall::SetCommitString(text.to_string()));
    }
}
