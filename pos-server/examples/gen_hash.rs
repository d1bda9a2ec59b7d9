use pos_server::db::models::User;

fn main() {
    let password = std::env::args().nth(1).unwrap_or_else(|| "test123".to_string());
    let hash = User::hash_password(&password).expect("Failed to hash password");
    println!("{hash}");
}
