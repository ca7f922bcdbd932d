use std::path::Path;

pub async fn run(db_path: &Path, port: u16) -> Result<(), String> {
    if !db_path.exists() {
        return Err(format!(
            "no database at {}. run `te init` first",
            db_path.display()
        ));
    }
    crate::web::serve(db_path, port).await
}
