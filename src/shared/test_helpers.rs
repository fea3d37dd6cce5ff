use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use crate::features::schools::models::{NewSchool, School};
use crate::features::schools::repositories::SchoolRepository;
use crate::features::schools::{routes, SchoolService};

/// Repository keeping schools in memory, with ids assigned from 1
#[derive(Default)]
pub struct InMemorySchoolRepository {
    schools: Mutex<Vec<School>>,
}

impl InMemorySchoolRepository {
    /// Store a school directly, bypassing validation. Address is fixed.
    pub fn seed(&self, name: &str, latitude: f64, longitude: f64) -> i64 {
        let mut schools = self.schools.lock().unwrap();
        let id = schools.len() as i64 + 1;
        schools.push(School {
            id,
            name: name.to_string(),
            address: "1 School Rd".to_string(),
            latitude,
            longitude,
        });
        id
    }

    pub fn schools(&self) -> Vec<School> {
        self.schools.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    async fn insert(&self, school: &NewSchool) -> Result<i64, sqlx::Error> {
        let mut schools = self.schools.lock().unwrap();
        let id = schools.len() as i64 + 1;
        schools.push(School {
            id,
            name: school.name.clone(),
            address: school.address.clone(),
            latitude: school.latitude,
            longitude: school.longitude,
        });
        Ok(id)
    }

    async fn fetch_all(&self) -> Result<Vec<School>, sqlx::Error> {
        Ok(self.schools())
    }
}

/// Repository behaving like a saturated or unreachable database
pub struct UnavailableSchoolRepository;

#[async_trait]
impl SchoolRepository for UnavailableSchoolRepository {
    async fn insert(&self, _school: &NewSchool) -> Result<i64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn fetch_all(&self) -> Result<Vec<School>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Test server over the schools routes backed by `repository`
pub fn test_server(repository: Arc<dyn SchoolRepository>) -> TestServer {
    let service = Arc::new(SchoolService::new(repository));
    TestServer::new(routes::routes(service)).unwrap()
}
