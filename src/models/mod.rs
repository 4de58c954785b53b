pub mod application;
pub mod attachment;
pub mod investor;
pub mod role;
pub mod session;
pub mod startup;

pub use application::{
    base_name, ApplicationLog, InterestLevel, InterestStatus, InterestUpdate, PitchDeck,
    SendPitchDeckRequest,
};
pub use attachment::Attachment;
pub use investor::InvestorProfile;
pub use role::Role;
pub use session::{Account, AuthToken, LoginRequest, OtpRequest, OtpResponse, Session, SignupRequest};
pub use startup::{Founder, FundUsage, RevenueMetrics, StartupProfile};
