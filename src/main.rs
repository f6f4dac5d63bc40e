#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tagstats_lib::run().await
}
