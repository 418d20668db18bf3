//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod announcement;
pub mod attendance;
pub mod finance;
pub mod grade;
pub mod navigation;
pub mod program;
pub mod quiz;
pub mod registration;
pub mod user;

pub use account::AccountService;
pub use announcement::{AnnouncementService, CreateAnnouncementInput, audiences_for_role};
pub use attendance::{AttendanceService, AttendanceSummary, MarkAttendanceInput};
pub use finance::{FinanceService, IssueInvoiceInput};
pub use grade::{GradeService, GradeSummary, RecordGradeInput, letter_grade};
pub use navigation::{DEFAULT_ROUTE, NavEntry, Resolution, Screen, nav_entries, resolve};
pub use program::{CreateProgramInput, ProgramService, RosterEntry, UpdateProgramInput};
pub use quiz::{CreateQuizInput, QuizService};
pub use registration::{RegistrationService, SubmitApplicationInput};
pub use user::{StudentRecord, TeacherRecord, UpdateUserInput, UserService};
