pub mod squadron;
pub mod squadron_member;

pub use squadron::SquadronRepository;
pub use squadron_member::SquadronMemberRepository;
