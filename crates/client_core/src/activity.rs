use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Shared between the submission controller and the upload reconciler.
/// Publishing is allowed only while neither flag is set.
#[derive(Debug, Default)]
pub struct PublishActivity {
    submitting: AtomicBool,
    uploading: AtomicBool,
}

impl PublishActivity {
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::Acquire)
    }

    pub fn can_publish(&self) -> bool {
        !self.is_submitting() && !self.is_uploading()
    }

    pub fn set_uploading(&self, uploading: bool) {
        let previous = self.uploading.swap(uploading, Ordering::AcqRel);
        if previous != uploading {
            debug!(uploading, "upload activity changed");
        }
    }

    /// Marks a submission as in flight until the returned guard drops.
    /// Returns `None` while an upload or another submission is running.
    pub fn try_begin_submission(&self) -> Option<SubmissionGuard<'_>> {
        if self.is_uploading() {
            return None;
        }
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard { activity: self })
    }
}

pub struct SubmissionGuard<'a> {
    activity: &'a PublishActivity,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.activity.submitting.store(false, Ordering::Release);
    }
}
