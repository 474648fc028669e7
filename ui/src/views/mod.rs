pub mod contact;
pub mod course_detail;
pub mod courses;
pub mod home;

pub use contact::ContactPage;
pub use course_detail::CourseDetailPage;
pub use courses::CoursesPage;
pub use home::HomePage;
