pub mod member;

pub use member::PostgresMemberRepository;
