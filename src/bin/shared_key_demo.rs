use std::env;

use shared_key_rsa::{CipherSession, SessionConfig};

fn main() -> Result<(), shared_key_rsa::Error> {
    let message = env::args().skip(1).collect::<Vec<_>>().join(" ");

    let session = CipherSession::initialize(&SessionConfig::default())?;
    println!("Modulus N: {}", session.modulus().n);

    let encrypted = session.encrypt(&message)?;
    println!("Encrypt message: {}", encrypted);

    // Decrypt from the printed form, the way a user would paste it back.
    match session.decrypt_text(&encrypted.to_string()) {
        Ok(decrypted) => println!("Decrypt message: {}", decrypted),
        Err(err) => println!("Decrypt failed: {}", err),
    }

    Ok(())
}
