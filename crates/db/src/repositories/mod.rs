//! Database repositories.

mod announcement;
mod attendance;
mod grade;
mod invoice;
mod program;
mod quiz;
mod session;
mod student_profile;
mod teacher_profile;
mod user;
mod user_profile;

pub use announcement::AnnouncementRepository;
pub use attendance::AttendanceRepository;
pub use grade::GradeRepository;
pub use invoice::InvoiceRepository;
pub use program::ProgramRepository;
pub use quiz::QuizRepository;
pub use session::SessionRepository;
pub use student_profile::StudentProfileRepository;
pub use teacher_profile::TeacherProfileRepository;
pub use user::UserRepository;
pub use user_profile::UserProfileRepository;
