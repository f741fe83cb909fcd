/// Ports module defining the interfaces between the sync use case and
/// the outside world (NVD API, mirror directory, git, console).
pub mod outbound;
