mod workplace_repository;

pub use workplace_repository::WorkplaceRepository;
