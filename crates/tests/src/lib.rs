pub mod fixtures;

#[cfg(test)]
mod auth_tests;
#[cfg(test)]
mod cors_tests;
#[cfg(test)]
mod member_tests;
#[cfg(test)]
mod migration_tests;
#[cfg(test)]
mod registration_tests;
