mod smtp_notifier_test;
