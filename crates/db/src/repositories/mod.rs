//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. The few lookups that must run
//! inside a caller's transaction take `&mut PgConnection` instead.

pub mod attendance_record_repo;
pub mod attendance_session_repo;
pub mod batch_repo;
pub mod class_swap_repo;
pub mod course_repo;
pub mod department_repo;
pub mod faculty_repo;
pub mod report_repo;
pub mod section_repo;
pub mod student_repo;
pub mod timetable_repo;
pub mod user_repo;

pub use attendance_record_repo::AttendanceRecordRepo;
pub use attendance_session_repo::AttendanceSessionRepo;
pub use batch_repo::BatchRepo;
pub use class_swap_repo::ClassSwapRepo;
pub use course_repo::CourseRepo;
pub use department_repo::DepartmentRepo;
pub use faculty_repo::FacultyRepo;
pub use report_repo::ReportRepo;
pub use section_repo::SectionRepo;
pub use student_repo::StudentRepo;
pub use timetable_repo::TimetableRepo;
pub use user_repo::UserRepo;
