use panasonic_eolia::{MessageLog, Session, TlsMode};
use std::env;

#[tokio::main]
async fn main() -> panasonic_eolia::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let username = args.get(1).expect("usage: status <username> <password> [--raw] [--insecure]");
    let password = args.get(2).expect("usage: status <username> <password> [--raw] [--insecure]");

    let mut builder = Session::builder(username, password);
    if args.iter().any(|a| a == "--raw") {
        builder = builder.message_log(MessageLog::Stdout);
    }
    if args.iter().any(|a| a == "--insecure") {
        builder = builder.tls(TlsMode::Insecure);
    }

    let mut session = builder.build()?;
    session.login().await?;

    let result = print_devices(&mut session).await;
    session.logout().await?;
    result
}

async fn print_devices(session: &mut Session) -> panasonic_eolia::Result<()> {
    let devices = session.list_devices().await?.to_vec();
    for device in devices {
        let p = session.get_device(&device.id).await?.parameters;
        println!(
            "[{}] {} | power: {:?} | mode: {:?} | fan: {:?} | swing: {:?} | set: {:?} | in: {:?} | out: {:?}",
            device.name,
            device.model,
            p.power,
            p.mode,
            p.fan_speed,
            p.air_swing_vertical,
            p.temperature,
            p.temperature_inside,
            p.temperature_outside,
        );
    }
    Ok(())
}
