/// Authentication primitives
///
/// - `jwt`: HS256 access/refresh token creation and validation
/// - `password`: Argon2id hashing and verification
/// - `middleware`: the `AuthContext` injected into request extensions
///
/// Token issuance and verification live here; the authorization rules over
/// projects and tasks live in `crate::access`.

pub mod jwt;
pub mod middleware;
pub mod password;
