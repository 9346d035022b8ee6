pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;

mod developers_sea_repo;
mod permissions_sea_repo;
mod resources_sea_repo;

pub use developers_sea_repo::OrmDevelopersRepository;
pub use permissions_sea_repo::OrmPermissionsRepository;
pub use resources_sea_repo::OrmResourcesRepository;
