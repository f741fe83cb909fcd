/// ProgressReporter port for reporting progress during a sync
///
/// Everything reported here goes to stderr; stdout is reserved for the
/// final run summary.
pub trait ProgressReporter {
    /// Reports a status line
    fn report(&self, message: &str);

    /// Reports pagination progress
    ///
    /// # Arguments
    /// * `current` - Records received so far for the current query
    /// * `total` - Total records the API reported for the query
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning, such as a failed request that will be retried
    fn report_warning(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
