pub mod seaorm;

pub use seaorm::SeaOrmAdvertisementRepository;
