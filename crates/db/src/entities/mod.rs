//! Database entities.

#![allow(missing_docs)]

pub mod announcement;
pub mod attendance_record;
pub mod grade;
pub mod invoice;
pub mod program;
pub mod quiz;
pub mod registration_application;
pub mod session;
pub mod student_profile;
pub mod teacher_profile;
pub mod user;
pub mod user_profile;

pub use announcement::Entity as Announcement;
pub use attendance_record::Entity as AttendanceRecord;
pub use grade::Entity as Grade;
pub use invoice::Entity as Invoice;
pub use program::Entity as Program;
pub use quiz::Entity as Quiz;
pub use registration_application::Entity as RegistrationApplication;
pub use session::Entity as Session;
pub use student_profile::Entity as StudentProfile;
pub use teacher_profile::Entity as TeacherProfile;
pub use user::Entity as User;
pub use user_profile::Entity as UserProfile;
