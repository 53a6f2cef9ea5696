//! Ordered collection of job descriptors and the `jobList` emitter.
//!
//! The downstream scheduler consumes a single Python assignment of the form
//! `jobList = [ {...}, {...} ]`, one record per job. This module owns the
//! collection and the assignment emitter; it does not schedule anything
//! itself.

use std::io::Write;

use crate::error::CoreError;
use crate::job::JobDescriptor;
use crate::scheduling;

/// An ordered list of job descriptors destined for one scheduler run.
///
/// Jobs keep their insertion order; emission reorders them by descending
/// priority (stable, so equal priorities keep insertion order).
#[derive(Debug, Clone, Default)]
pub struct JobList {
    jobs: Vec<JobDescriptor>,
}

impl JobList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job to the list.
    pub fn add(&mut self, job: JobDescriptor) {
        self.jobs.push(job);
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobDescriptor> {
        self.jobs.iter()
    }

    /// Indices of the jobs in dispatch order: descending priority, ties in
    /// insertion order.
    pub fn dispatch_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.jobs.len()).collect();
        order.sort_by(|&a, &b| {
            scheduling::cmp_dispatch(self.jobs[a].priority(), self.jobs[b].priority())
        });
        order
    }

    /// Render the full `jobList = [...]` assignment, records in dispatch
    /// order. An empty list renders as `jobList = []`.
    pub fn python_assignment(&self) -> String {
        let mut buf = String::from("jobList = [");
        for (i, &idx) in self.dispatch_order().iter().enumerate() {
            if i > 0 {
                buf.push(',');
            }
            buf.push('\n');
            let record = self.jobs[idx].python_record();
            buf.push_str(record.trim_end_matches('\n'));
        }
        buf.push_str("]\n");
        buf
    }

    /// Write the `jobList` assignment to `out`.
    ///
    /// Buffered like [`JobDescriptor::write_python_record`]: the assignment
    /// is rendered fully before a single write, and a stream failure
    /// propagates unmodified as [`CoreError::Write`].
    pub fn write_python_assignment(&self, out: &mut impl Write) -> Result<(), CoreError> {
        out.write_all(self.python_assignment().as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::{PRIORITY_BACKGROUND, PRIORITY_NORMAL, PRIORITY_URGENT};

    fn named_job(priority: i32, exe: &str) -> JobDescriptor {
        let mut job = JobDescriptor::new(priority);
        job.set_portable_exe(exe);
        job
    }

    #[test]
    fn empty_list_renders_empty_assignment() {
        assert_eq!(JobList::new().python_assignment(), "jobList = []\n");
    }

    #[test]
    fn single_job_assignment_wraps_its_record() {
        let mut list = JobList::new();
        list.add(named_job(PRIORITY_NORMAL, "/bin/eclipse"));

        let record = list.iter().next().unwrap().python_record();
        let expected = format!("jobList = [\n{}]\n", record.trim_end_matches('\n'));
        assert_eq!(list.python_assignment(), expected);
    }

    #[test]
    fn dispatch_order_is_descending_priority() {
        let mut list = JobList::new();
        list.add(named_job(PRIORITY_BACKGROUND, "/bin/a"));
        list.add(named_job(PRIORITY_URGENT, "/bin/b"));
        list.add(named_job(PRIORITY_NORMAL, "/bin/c"));

        assert_eq!(list.dispatch_order(), vec![1, 2, 0]);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut list = JobList::new();
        list.add(named_job(PRIORITY_NORMAL, "/bin/first"));
        list.add(named_job(PRIORITY_NORMAL, "/bin/second"));
        list.add(named_job(PRIORITY_NORMAL, "/bin/third"));

        assert_eq!(list.dispatch_order(), vec![0, 1, 2]);
    }

    #[test]
    fn assignment_lists_records_in_dispatch_order() {
        let mut list = JobList::new();
        list.add(named_job(PRIORITY_BACKGROUND, "/bin/slow"));
        list.add(named_job(PRIORITY_URGENT, "/bin/fast"));

        let assignment = list.python_assignment();
        let fast = assignment.find("/bin/fast").unwrap();
        let slow = assignment.find("/bin/slow").unwrap();
        assert!(fast < slow);
        assert!(assignment.starts_with("jobList = [\n"));
        assert!(assignment.ends_with("}]\n"));
    }

    #[test]
    fn write_assignment_matches_rendered_string() {
        let mut list = JobList::new();
        list.add(named_job(PRIORITY_NORMAL, "/bin/eclipse"));

        let mut out = Vec::new();
        list.write_python_assignment(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), list.python_assignment());
    }
}
