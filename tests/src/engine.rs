mod scan;
mod sniff;
mod spoof;
