// Prints OS scheduler setup instructions. Nothing is installed
// automatically; the text is meant to be pasted by hand.
use std::env;
use std::path::PathBuf;

pub fn print_instructions() {
    let binary = env::current_exe().unwrap_or_else(|_| PathBuf::from("ipo-monitor"));
    let binary = binary.display();

    println!("{}", "=".repeat(70));
    println!("  IPO Monitor – Scheduler Setup Instructions");
    println!("{}", "=".repeat(70));

    println!(
        r#"
┌─────────────────────────────────────────────────────────────────┐
│  LINUX / macOS  –  crontab                                      │
└─────────────────────────────────────────────────────────────────┘

  Step 1 – Open your crontab editor:

      crontab -e

  Step 2 – Paste the line below:

      0 5 * * 1-5 {binary} >> $HOME/ipo_monitor.log 2>&1

  Explanation of the cron schedule:
      0   5   *   *   1-5
      │   │   │   │   └── Mon–Fri only (US market days)
      │   │   │   └────── Every month
      │   │   └────────── Every day
      │   └────────────── 05:00 UTC
      └────────────────── Minute 0

  Step 3 – Verify it was saved:

      crontab -l
"#
    );

    println!(
        r#"┌─────────────────────────────────────────────────────────────────┐
│  SERVER  –  systemd timer                                       │
└─────────────────────────────────────────────────────────────────┘

  Create two files in /etc/systemd/system/ :

  ── /etc/systemd/system/ipo-monitor.service ──
      [Unit]
      Description=IPO Monitor – daily alert

      [Service]
      ExecStart={binary}
      # Point this at the directory holding your .env file.
      WorkingDirectory=/opt/ipo-monitor
      StandardOutput=append:/var/log/ipo_monitor.log
      StandardError=append:/var/log/ipo_monitor.log

  ── /etc/systemd/system/ipo-monitor.timer ──
      [Unit]
      Description=Run IPO Monitor every weekday at 05:00 UTC

      [Timer]
      OnCalendar=Mon-Fri 05:00 UTC
      Persistent=true

      [Install]
      WantedBy=timers.target

  Then enable & start:
      sudo systemctl daemon-reload
      sudo systemctl enable ipo-monitor.timer
      sudo systemctl start  ipo-monitor.timer
"#
    );

    println!(
        r#"┌─────────────────────────────────────────────────────────────────┐
│  WINDOWS  –  Task Scheduler (schtasks)                          │
└─────────────────────────────────────────────────────────────────┘

  Open cmd.exe as Administrator and run:

      schtasks /create /tn "IPO Monitor" ^
        /tr "{binary}" ^
        /sc daily /st 05:00 /ru SYSTEM /rl HIGHEST /f

  Note: schtasks uses local time. Adjust /st so it lands on
        05:00 UTC, or use the Task Scheduler GUI and tick
        "Synchronize across time zones".
"#
    );
}
